// GenBrowser services
// Services provide stateless or shared functionality: ad filtering, config, page files, themes.

pub mod ad_filter;
pub mod config_store;
pub mod page_io;
pub mod theme_engine;
