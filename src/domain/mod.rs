// Domain layer: rule and decision value types plus the ports the core reads through.

pub mod model;
pub mod ports;
