// Domain layer: core models and ports (interfaces) for the commit log and the task board.

pub mod model;
pub mod ports;
