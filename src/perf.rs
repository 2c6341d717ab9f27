/// Performance instrumentation utilities

/// Profiling scope plus a debug-level timing event
/// Usage: timed!("operation name", { code })
#[macro_export]
macro_rules! timed {
    ($name:expr, $block:expr) => {{
        profiling::scope!($name);
        let _t = std::time::Instant::now();
        let r = $block;
        tracing::debug!(elapsed = ?_t.elapsed(), "{}", $name);
        r
    }};
}

#[cfg(feature = "profile-with-puffin")]
pub use capture::FrameCapture;

#[cfg(feature = "profile-with-puffin")]
mod capture {
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::Path;

    use crate::error::{FixtureError, Result};

    /// Collects the puffin frames finished while it is alive
    pub struct FrameCapture {
        view: puffin::GlobalFrameView,
    }

    impl FrameCapture {
        /// Turn puffin scopes on and start collecting frames
        pub fn start() -> Self {
            puffin::set_scopes_on(true);
            Self {
                view: puffin::GlobalFrameView::default(),
            }
        }

        /// Write the collected frames in the format `puffin_viewer` opens
        pub fn save(&self, path: &Path) -> Result<()> {
            let file = File::create(path).map_err(|e| FixtureError::io(path, e))?;
            let mut writer = BufWriter::new(file);
            self.view
                .lock()
                .write(&mut writer)
                .map_err(|e| FixtureError::io(path, std::io::Error::other(e.to_string())))?;
            writer.flush().map_err(|e| FixtureError::io(path, e))?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use tempfile::TempDir;

        #[test]
        fn test_capture_writes_finished_frames() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("run.puffin");

            let capture = FrameCapture::start();
            {
                puffin::profile_scope!("render_frame");
                std::hint::black_box((0..1000).sum::<u64>());
            }
            profiling::finish_frame!();
            capture.save(&path).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(b"PUF0"));
        }
    }
}
