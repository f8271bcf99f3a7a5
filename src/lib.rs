pub mod api;
pub mod cli;
pub mod cobalt;
pub mod config;
pub mod error;
pub mod export;
pub mod pages;
pub mod proxy;
pub mod response;
pub mod sites;
