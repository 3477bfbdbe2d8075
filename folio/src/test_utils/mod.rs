// SPDX-License-Identifier: AGPL-3.0-or-later

mod client;
mod fixtures;
mod handler;

pub use client::http_test_client;
pub use fixtures::{blog_config, config_from_json, TestAdapter};
pub use handler::RecordingHandler;
