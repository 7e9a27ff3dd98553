//! Glide Animation System
//!
//! Spring physics for interruptible UI motion.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Interruptible**: Retargeting keeps the current value and velocity
//! - **Exact settling**: Settled springs land exactly on their target

pub mod spring;

pub use spring::{Spring, SpringConfig};
