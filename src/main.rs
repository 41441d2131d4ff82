// Circle demo - Main entry point
//
// Opens a window, draws a random circle every frame and exits on
// close, Escape or Q.

use circle_demo::display::{SessionConfig, WindowBackend};
use circle_demo::session::run_session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Circle demo v{}", env!("CARGO_PKG_VERSION"));
    println!("==================");
    println!();

    let config = SessionConfig::default();
    println!("  Window size: {}x{}", config.width, config.height);
    println!("  Depth: {}-bit", config.depth);
    println!("  Frame delay: {}ms", config.frame_delay_ms);
    println!();
    println!("Press Escape, Q or the close button to exit.");
    println!();

    let mut rng = rand::thread_rng();
    match run_session(WindowBackend::new(), config, &mut rng) {
        Ok(summary) => {
            println!("Display closed after {} frames.", summary.frames);
            Ok(())
        }
        Err(err) => {
            log::error!("Session ended with an error: {}", err);
            Err(err.into())
        }
    }
}
