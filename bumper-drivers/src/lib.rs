//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in bumper-core for the vehicle hardware:
//!
//! - Drive motor behind an H-bridge (two direction pins, one PWM channel)
//! - Steering servo on a PWM channel
//! - HC-SR04 style ultrasonic ranger with interrupt-safe echo capture

#![no_std]
#![deny(unsafe_code)]

pub mod motor;
pub mod sensor;
pub mod servo;
