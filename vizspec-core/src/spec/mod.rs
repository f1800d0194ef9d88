pub mod attachments;
pub mod channel;
pub mod chart;
pub mod config;
pub mod data;
pub mod encoding;
pub mod guide;
pub mod layout;
pub mod mark;
pub mod params;
pub mod projection;
pub mod resolve;
pub mod scale;
pub mod title;
pub mod transform;
pub mod update;
pub mod values;
