use anyhow::Result;
use clap::Parser;
use gemini_native_image::app::{App, DemoArgs};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PROMPT: &str =
    "An image of a black sports car in the style of a 1960s Ferrari, \
     and create a 1-sentence marketing description";
const DEFAULT_EDIT_PROMPT: &str = "Make the car red";

#[derive(Debug, Parser)]
#[command(name = "gemini-native-image")]
#[command(about = "Generate an image with Gemini, then edit it with a follow-up prompt")]
struct CliArgs {
    /// Prompt for the initial generation.
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Prompt for the edit step, applied to the generated image.
    #[arg(long, default_value = DEFAULT_EDIT_PROMPT)]
    edit_prompt: String,

    /// Where to save the generated image.
    #[arg(long, default_value = "car.png")]
    output: PathBuf,

    /// Where to save the edited image.
    #[arg(long, default_value = "car_red.png")]
    edit_output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_native_image=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let app = App::new();
    match app
        .run(DemoArgs {
            prompt: args.prompt,
            edit_prompt: args.edit_prompt,
            output: args.output,
            edit_output: args.edit_output,
        })
        .await
    {
        Ok(_) => {
            info!("Demo completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Demo failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_defaults_match_demo() {
        let args = CliArgs::parse_from(["gemini-native-image"]);
        assert_eq!(args.output.to_str(), Some("car.png"));
        assert_eq!(args.edit_output.to_str(), Some("car_red.png"));
        assert_eq!(args.edit_prompt, "Make the car red");
    }

    #[test]
    fn test_overrides() {
        let args = CliArgs::parse_from([
            "gemini-native-image",
            "--prompt",
            "a red bicycle",
            "--output",
            "bike.png",
        ]);
        assert_eq!(args.prompt, "a red bicycle");
        assert_eq!(args.output.to_str(), Some("bike.png"));
    }
}
