use std::time::Duration;

use tokio::{io::AsyncReadExt, process::Child};

/// How long a child gets to exit after SIGTERM before it is killed outright.
const TERM_GRACE: Duration = Duration::from_secs(2);

/// Drain a child pipe to the end, decoding lossily.
pub(crate) async fn read_all<R>(mut pipe: R) -> std::io::Result<String>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(target_family = "unix")]
pub(crate) async fn kill_graceful(child: &mut Child) -> std::io::Result<()> {
    if let Some(id) = child.id() {
        // SAFETY: plain syscall on a pid we own and have not reaped yet.
        unsafe {
            libc::kill(id as libc::pid_t, libc::SIGTERM);
        }
        if tokio::time::timeout(TERM_GRACE, child.wait()).await.is_ok() {
            return Ok(());
        }
    }
    child.kill().await
}

#[cfg(not(target_family = "unix"))]
pub(crate) async fn kill_graceful(child: &mut Child) -> std::io::Result<()> {
    child.kill().await
}
