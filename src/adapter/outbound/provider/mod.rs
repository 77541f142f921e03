//! Concentration provider adapters, one per upstream.

pub mod birdeye;
pub mod bitget;
pub mod extract;
pub mod moralis;
pub mod solscan;

pub use birdeye::BirdeyeProvider;
pub use bitget::BitgetProvider;
pub use moralis::MoralisProvider;
pub use solscan::SolscanProvider;
