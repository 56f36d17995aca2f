#![no_std]

pub mod app;
pub mod calendar;
pub mod nmea;
pub mod rng;
pub mod services;

#[cfg(test)]
extern crate std;

#[cfg(test)]
pub(crate) mod testutil;
