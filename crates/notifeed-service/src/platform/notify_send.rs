//! Desktop notices through the freedesktop `notify-send` tool.

use std::process::{Command, Stdio};

use async_trait::async_trait;
use tracing::debug;

use notifeed_core::error::{AppError, ErrorKind};
use notifeed_core::result::AppResult;
use notifeed_core::traits::{DesktopNotice, DesktopNotifier, NoticeId, NotificationPermission};

const PROGRAM: &str = "notify-send";

/// Shells out to `notify-send`. The notification server handles expiry, so
/// `close` and `focus_host` have nothing to do.
#[derive(Debug, Clone)]
pub struct NotifySendNotifier {
    available: bool,
    expire_ms: u64,
}

impl NotifySendNotifier {
    /// Probes for the `notify-send` binary.
    pub fn detect(expire_ms: u64) -> Self {
        let available = Command::new(PROGRAM)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        debug!(available, "Probed for notify-send");
        Self {
            available,
            expire_ms,
        }
    }

    /// Arguments passed for `notice`.
    pub fn args(&self, notice: &DesktopNotice) -> Vec<String> {
        let mut args = vec![
            "--app-name=notifeed".to_string(),
            format!("--expire-time={}", self.expire_ms),
        ];
        if let Some(icon) = &notice.icon {
            args.push(format!("--icon={icon}"));
        }
        if let Some(tag) = &notice.tag {
            args.push(format!("--hint=string:x-dunst-stack-tag:{tag}"));
        }
        args.push(notice.title.clone());
        if let Some(body) = &notice.body {
            args.push(body.clone());
        }
        args
    }
}

#[async_trait]
impl DesktopNotifier for NotifySendNotifier {
    fn supported(&self) -> bool {
        self.available
    }

    fn permission(&self) -> NotificationPermission {
        if self.available {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        }
    }

    async fn request_permission(&self) -> AppResult<NotificationPermission> {
        Ok(self.permission())
    }

    fn show(&self, notice: &DesktopNotice) -> AppResult<NoticeId> {
        let status = Command::new(PROGRAM)
            .args(self.args(notice))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| AppError::with_source(ErrorKind::Platform, "Failed to run notify-send", e))?;
        if !status.success() {
            return Err(AppError::platform(format!("notify-send exited with {status}")));
        }
        Ok(NoticeId::new())
    }

    fn close(&self, _id: NoticeId) -> AppResult<()> {
        Ok(())
    }

    fn focus_host(&self) -> AppResult<()> {
        Ok(())
    }
}
