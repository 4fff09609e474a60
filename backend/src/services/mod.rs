//! Business logic services for the Tranche Monitor
//!
//! Each service runs the subgraph queries behind one page and assembles a
//! view model. Nothing is kept between requests.

pub mod account;
pub mod bond;
pub mod dashboard;
pub mod token;
pub mod tranche;

pub use account::AccountService;
pub use bond::BondService;
pub use dashboard::DashboardService;
pub use token::TokenService;
pub use tranche::TrancheService;
