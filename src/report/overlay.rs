// Overlay sink: renders the finished report as a standalone HTML panel

use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::logging::{log_debug, log_warn};

/// Owned handle to one rendered overlay. Dropping it leaves the overlay in
/// place; call [`PresentationSink::remove`] to tear it down.
#[derive(Debug, PartialEq, Eq)]
pub struct OverlayHandle {
  pub id: Uuid,
  pub path: PathBuf,
}

pub trait PresentationSink: Send + Sync {
  fn render(&self, lines: &[String], link: &str) -> Option<OverlayHandle>;
  fn remove(&self, handle: OverlayHandle);
}

pub struct HtmlOverlaySink {
  dir: PathBuf,
}

impl HtmlOverlaySink {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }
}

fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

pub fn render_html(lines: &[String], link: &str) -> String {
  let mut body = String::new();
  for line in lines {
    body.push_str(&format!("    <p class=\"lobby-line\">{}</p>\n", escape_html(line)));
  }
  let link = escape_html(link);

  format!(
    "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>Lobby Reveal</title>\n</head>\n<body>\n  <div id=\"lobby-reveal\">\n{}    <a href=\"{}\" target=\"_blank\">{}</a>\n  </div>\n</body>\n</html>\n",
    body, link, link
  )
}

impl PresentationSink for HtmlOverlaySink {
  fn render(&self, lines: &[String], link: &str) -> Option<OverlayHandle> {
    if let Err(e) = fs::create_dir_all(&self.dir) {
      log_warn(&format!("Could not create overlay dir {}: {}", self.dir.display(), e));
      return None;
    }

    let id = Uuid::new_v4();
    let path = self.dir.join(format!("lobby-{}.html", id));
    match fs::write(&path, render_html(lines, link)) {
      Ok(()) => {
        log_debug(&format!("Overlay written to {}", path.display()));
        Some(OverlayHandle { id, path })
      }
      Err(e) => {
        log_warn(&format!("Failed to write overlay {}: {}", path.display(), e));
        None
      }
    }
  }

  fn remove(&self, handle: OverlayHandle) {
    match fs::remove_file(&handle.path) {
      Ok(()) => log_debug(&format!("Overlay {} removed", handle.id)),
      Err(e) => log_warn(&format!("Failed to remove overlay {}: {}", handle.path.display(), e)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn html_escapes_report_text() {
    let html = render_html(&["<b>Name</b> - G4".to_string()], "https://x/?a=1&b=2");
    assert!(html.contains("&lt;b&gt;Name&lt;/b&gt; - G4"));
    assert!(html.contains("href=\"https://x/?a=1&amp;b=2\""));
  }

  #[test]
  fn render_then_remove_cleans_up_file() {
    let dir = std::env::temp_dir().join(format!("lobby-reveal-overlay-{}", Uuid::new_v4()));
    let sink = HtmlOverlaySink::new(&dir);

    let handle = sink
      .render(&["A - G4 - 50% - Top - 2.00 KDA".to_string()], "https://www.op.gg/multisearch/euw?summoners=A%23EUW")
      .unwrap();
    assert!(handle.path.exists());
    assert!(fs::read_to_string(&handle.path).unwrap().contains("A - G4 - 50% - Top - 2.00 KDA"));

    let path = handle.path.clone();
    sink.remove(handle);
    assert!(!path.exists());

    let _ = fs::remove_dir_all(&dir);
  }
}
