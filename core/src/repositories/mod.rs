pub mod account;
pub mod store;
pub mod token;

pub use account::AccountRepository;
pub use store::StoreRepository;
pub use token::TokenRepository;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use store::MockStoreRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
