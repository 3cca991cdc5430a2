use eframe::egui;
use quake_chime::DashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 420.0])
            .with_title("Quake Chime - Earthquake Alert Sounds"),
        ..Default::default()
    };

    eframe::run_native(
        "Quake Chime",
        options,
        Box::new(|cc| {
            match DashboardApp::new(cc) {
                Ok(app) => Ok(Box::new(app)),
                Err(e) => {
                    eprintln!("Failed to initialize app: {}", e);
                    std::process::exit(1);
                }
            }
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
