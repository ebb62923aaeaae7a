#![no_std]

pub mod light_sensor;
pub mod relay;
