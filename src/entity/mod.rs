//! Response payloads of the upstream API.

pub mod de;
pub mod order;
pub mod rate;
pub mod scan_form;
pub mod shipping_label;
pub mod token;
pub mod user;

pub use order::{CreateOrderResult, Fee, FeeDetail, Order, OrderLabels};
pub use rate::{ChargeDetail, RateCalcResult};
pub use scan_form::ScanForm;
pub use shipping_label::{Label, ShippingLabel};
pub use token::{AccessToken, TokenUser};
pub use user::{ShipperAddress, UserInfo};
