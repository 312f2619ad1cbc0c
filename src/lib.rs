pub mod config;
pub mod crawler;
pub mod email;
pub mod error;
pub mod i18n;
pub mod notifications;
pub mod pages;
pub mod robots;
pub mod routing;
pub mod server;
pub mod sitemap;
pub mod villas;
