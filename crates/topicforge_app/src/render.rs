use std::io::{self, Write};

use topicforge_core::{AppViewModel, Notice, NoticeSeverity, Progress, Screen};

/// Prints view model changes as plain terminal lines.
pub struct Renderer<W: Write> {
    out: W,
    last_progress: Progress,
    last_notice: Option<Notice>,
    last_screen: Screen,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_progress: Progress::idle(),
            last_notice: None,
            last_screen: Screen::Input,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        if view.progress != self.last_progress && !view.progress.is_idle() {
            writeln!(
                self.out,
                "[{}/{}] {}",
                view.progress.current(),
                view.progress.total(),
                step_label(view.progress.current())
            )?;
        }
        self.last_progress = view.progress;

        if view.screen == Screen::Preview && self.last_screen != Screen::Preview {
            for row in &view.blocks {
                writeln!(
                    self.out,
                    "{:>3}. {} ({} words)",
                    row.index + 1,
                    row.title,
                    row.word_count
                )?;
            }
        }
        self.last_screen = view.screen;

        if view.notice != self.last_notice {
            if let Some(notice) = &view.notice {
                match notice.severity {
                    NoticeSeverity::Info => writeln!(self.out, "{}", notice.text)?,
                    NoticeSeverity::Error => writeln!(self.out, "error: {}", notice.text)?,
                }
            }
            self.last_notice = view.notice.clone();
        }
        self.out.flush()
    }

    /// Prints the markdown preview under a banner; dark theme inverts the banner.
    pub fn preview(&mut self, topic: &str, dark_theme: bool, markdown: &str) -> io::Result<()> {
        let banner = format!(" {} ", topic.trim());
        if dark_theme {
            writeln!(self.out, "\x1b[7m{banner}\x1b[0m")?;
        } else {
            writeln!(self.out, "{banner}")?;
            writeln!(self.out, "{}", "=".repeat(banner.chars().count()))?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{markdown}")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn step_label(current: u8) -> &'static str {
    match current {
        1 => "Drafting outline",
        2 => "Writing sections",
        _ => "Done",
    }
}
