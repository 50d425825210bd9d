//! Bond scoring.
//!
//! Responsibilities:
//!
//! - credit-quality curve, logistic trust cliff, wrong-way FX correlation
//! - Ornstein-Uhlenbeck FX haircut model and the per-pair capital penalty
//! - issuer trust classification with unknown-issuer capture
//! - market-wide penalty calibration (`lambda_base`)
//! - the profile-weighted scoring engine combining all of the above

pub mod calibrate;
pub mod credit;
pub mod engine;
pub mod fx_risk;
pub mod issuer;

pub use calibrate::*;
pub use credit::*;
pub use engine::*;
pub use fx_risk::*;
pub use issuer::*;
