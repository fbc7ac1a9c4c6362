pub mod config;
pub mod logging;

pub mod download;
pub mod interceptor;
pub mod matcher;
pub mod resolver;
pub mod rules;
pub mod services;
pub mod template;
