//! Startup banner.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::consts::{AUTHOR, SYSTEM_VERSION};

/// Gateway settings shown at startup.
pub struct BannerInfo<'a> {
    pub addr: SocketAddr,
    pub interpreter: &'a str,
    pub scripts_dir: &'a Path,
    pub default_script: &'a str,
    pub timeout: Duration,
}

pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║        C B M - Q   G A T E W A Y      ║
   ╚═══════════════════════════════════════╝

   version      {} ({})
   by           {}
   endpoint     http://{}
   interpreter  {}
   scripts      {}
   default      {}
   timeout      {}s

   routes
     GET  /status    system status
     POST /simulate  run a script
     POST /chat      chat echo stub
"#,
        SYSTEM_VERSION,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        info.addr,
        info.interpreter,
        info.scripts_dir.display(),
        info.default_script,
        info.timeout.as_secs(),
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn info(scripts: &Path) -> BannerInfo<'_> {
        BannerInfo {
            addr: "127.0.0.1:3000".parse().unwrap(),
            interpreter: "julia",
            scripts_dir: scripts,
            default_script: "genesis_run.jl",
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn banner_lists_settings_and_routes() {
        let scripts = PathBuf::from("/tmp/scripts");
        let text = render_banner(&info(&scripts));
        assert!(text.contains("http://127.0.0.1:3000"));
        assert!(text.contains("/tmp/scripts"));
        assert!(text.contains("30s"));
        assert!(text.contains("POST /simulate"));
        assert!(text.contains("GET  /status"));
    }

    #[test]
    fn print_banner_does_not_panic() {
        let scripts = PathBuf::from("/tmp/scripts");
        print_banner(&info(&scripts));
    }
}
