//! Domain layer: cart state, money, shipping policy and the ports the
//! checkout flow talks through.

pub mod cart;
pub mod charge;
pub mod favorites;
pub mod money;
pub mod ports;
pub mod product;
pub mod shipping;
