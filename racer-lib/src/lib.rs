#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

pub mod common;
pub mod config;
pub mod game;
pub mod graphics;
pub mod log;
pub mod machine;
pub mod menu;
pub mod obstacles;
pub mod screens;
pub mod settings;
pub mod sound;
pub mod vehicle;

#[cfg(test)]
mod testing;
