//! Shared fixtures for integration tests.

use std::path::{Path, PathBuf};

/// A combined descriptor exercising every section.
pub const SHOP_DESCRIPTOR: &str = "\
application:
  RACK_ROOT: /srv/shop
  RACK_ENV: development
web:
  host: shop.example.com
messaging:
  /queues/orders: OrderHandler
  /queues/audit:
    AuditHandler:
      durable: true
      filter: \"level = 'high'\"
    archive_handler:
  /topics/events:
    - EventLogger
    - MetricsHandler:
        concurrency: 4
        config:
          bucket: events
jobs:
  nightly_report:
    cron: '0 0 * * *'
";

/// Write `contents` to `name` inside `dir`, returning the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
