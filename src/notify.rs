use std::io::Write;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, variant: Variant) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }
}

/// Fire-and-forget sink for user notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to stderr.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        let mut err = std::io::stderr().lock();
        let marker = match n.variant {
            Variant::Default => "",
            Variant::Destructive => "[!] ",
        };
        writeln!(err, "{marker}{}: {}", n.title, n.description).ok();
    }
}

/// Forwards notifications to a UI loop.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, n: Notification) {
        if self.tx.send(n).is_err() {
            tracing::debug!("notification dropped: receiver closed");
        }
    }
}
