#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod body_weight;
mod error;
mod exercise;
mod export;
mod muscle_group;
mod name;
mod service;
mod statistics;
mod template;
mod training;
mod workout;

pub use crate::{
    body_weight::*, error::*, exercise::*, export::*, muscle_group::*, name::*, service::*,
    statistics::*, template::*, training::*, workout::*,
};
