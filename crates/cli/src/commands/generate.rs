//! `hookstudio generate` — One-shot generation.

use hookstudio_core::{InputSnapshot, Mode, ResultStatus};

use super::{build_controller, load_config, print_result, require_api_key};

pub struct GenerateArgs {
    pub mode: Mode,
    pub topic: String,
    pub audience: String,
    pub tone: Option<String>,
    pub info: Option<String>,
}

impl GenerateArgs {
    fn input(&self) -> InputSnapshot {
        let mut input = InputSnapshot::new(&self.topic, &self.audience);
        if let Some(tone) = &self.tone {
            input = input.with_tone(tone);
        }
        if let Some(info) = &self.info {
            input = input.with_additional_info(info);
        }
        input
    }
}

pub async fn run(args: GenerateArgs, ephemeral: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    require_api_key(&config)?;

    let mut controller = build_controller(&config, ephemeral)?;
    controller.change_mode(args.mode);
    controller.set_input(args.input());

    eprint!("  Gerando {}...", args.mode.title());
    controller.generate().await?;
    eprint!("\r{:width$}\r", "", width = 40);

    print_result(&controller);

    match controller.result().map(|r| r.status) {
        Some(ResultStatus::Error) => Err("Generation failed".into()),
        _ => Ok(()),
    }
}
