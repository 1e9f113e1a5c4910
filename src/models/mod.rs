mod account;
mod allocation;
mod overview;
mod version;

pub use account::{AccountOption, AccountType, LinkedAccount, LoginOutcome, Session};
pub use allocation::{AllocationRecord, AssetCategory, AssetClass, PortfolioData};
pub use overview::{AccountOverview, Transaction};
pub use version::VersionManifest;
