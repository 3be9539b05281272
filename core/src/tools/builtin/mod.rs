//! Built-in tools

pub mod calculator;
pub mod fetch_url;
pub mod now;
pub mod unit_converter;
pub mod web_search;
pub mod wikipedia;

pub use calculator::CalculatorTool;
pub use fetch_url::FetchUrlTool;
pub use now::NowTool;
pub use unit_converter::UnitConverterTool;
pub use web_search::WebSearchTool;
pub use wikipedia::WikipediaTool;
