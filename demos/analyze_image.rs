/// Tablet Analysis Example
///
/// Sends one photo of tablets to Gemini with the built-in pharmacist prompt and prints the
/// model's answer, without starting the web UI.
///
/// Usage:
///   cargo run --example analyze_image -- path/to/tablets.jpg ["optional extra notes"]
///
/// Requirements:
///   - GOOGLE_API_KEY set in the environment or a .env file
use chemist::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    load_dotenv(None);
    let config = AppConfig::from_env()?;

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: analyze_image <image> [notes]");
        std::process::exit(1);
    };
    let notes = args.next().unwrap_or_default();

    let Some(gemini) = GeminiConfig::from_app_config(&config) else {
        eprintln!("Error: {}", ChemistError::MissingApiKey);
        std::process::exit(1);
    };

    let file_name = image_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = tokio::fs::read(&image_path).await?;
    let upload = UploadedFile::new(file_name, None, bytes);

    let image = input_image_setup(Some(upload))?;

    println!("Analyzing {:?} as {}...", image_path, image[0].mime_type);
    println!();

    let broker = AnalysisBroker::new(config.model.clone(), Arc::new(GeminiGateway::with_config(gemini)));

    match broker.analyze(&image, &notes).await {
        Ok(response) => {
            println!("Response:");
            println!("{}", response);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
