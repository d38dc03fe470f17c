//! `hookstudio studio` — Interactive session over one workflow controller.

use std::io::Write;

use hookstudio_core::{Mode, TONES};
use hookstudio_workflow::{Completion, WorkflowController};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use super::history::print_entry;
use super::{build_controller, load_config, print_result, require_api_key};

const HELP: &str = "\
  mode <hooks|scripts|captions|hashtags|planner>   switch mode
  set topic|audience|tone|info <text>              edit inputs
  clear-info                                       drop extra context
  generate                                         generate for the current mode
  again                                            generate a variation
  select <n>                                       pick hook n for the next step
  next <mode>                                      carry this result into <mode>
  history                                          list results for this mode
  restore <n>                                      show history entry n
  clear-history                                    delete all history
  show                                             print inputs and result
  help                                             this text
  quit                                             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Topic,
    Audience,
    Tone,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioCommand {
    Mode(Mode),
    Set(Field, String),
    ClearInfo,
    Generate,
    Again,
    Select(usize),
    Next(Mode),
    History,
    Restore(usize),
    ClearHistory,
    Show,
    Help,
    Quit,
}

/// Parse one input line. Numbers are 1-based as printed.
pub fn parse_command(line: &str) -> Result<StudioCommand, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let number = |arg: &str| -> Result<usize, String> {
        match arg.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n - 1),
            _ => Err(format!("expected a number from 1, got '{arg}'")),
        }
    };

    match verb {
        "mode" => rest.parse().map(StudioCommand::Mode),
        "next" => rest.parse().map(StudioCommand::Next),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = match field {
                "topic" => Field::Topic,
                "audience" => Field::Audience,
                "tone" => Field::Tone,
                "info" => Field::Info,
                other => return Err(format!("unknown field '{other}'")),
            };
            Ok(StudioCommand::Set(field, value.trim().to_string()))
        }
        "clear-info" => Ok(StudioCommand::ClearInfo),
        "generate" | "gen" => Ok(StudioCommand::Generate),
        "again" => Ok(StudioCommand::Again),
        "select" => number(rest).map(StudioCommand::Select),
        "history" => Ok(StudioCommand::History),
        "restore" => number(rest).map(StudioCommand::Restore),
        "clear-history" => Ok(StudioCommand::ClearHistory),
        "show" => Ok(StudioCommand::Show),
        "help" | "?" => Ok(StudioCommand::Help),
        "quit" | "exit" | ":q" => Ok(StudioCommand::Quit),
        other => Err(format!("unknown command '{other}' (type 'help')")),
    }
}

pub async fn run(ephemeral: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    require_api_key(&config)?;
    let mut controller = build_controller(&config, ephemeral)?;

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║          HookStudio — Interactive Mode         ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", controller.gateway().model());
    println!("  History:   {} entries", controller.history().len());
    println!("  Tones:     {}", TONES.join(", "));
    println!();
    println!("  Type 'help' for commands, 'quit' to leave.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();
    prompt(&controller)?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            prompt(&controller)?;
            continue;
        }

        match parse_command(&line) {
            Ok(StudioCommand::Quit) => break,
            Ok(command) => apply(&mut controller, command).await,
            Err(e) => eprintln!("  [Error] {e}"),
        }
        prompt(&controller)?;
    }

    println!();
    println!("  Até a próxima! 👋");
    println!();
    Ok(())
}

fn prompt(controller: &WorkflowController) -> std::io::Result<()> {
    print!("  {} > ", controller.mode());
    std::io::stdout().flush()
}

async fn apply(controller: &mut WorkflowController, command: StudioCommand) {
    match command {
        StudioCommand::Mode(mode) => {
            controller.change_mode(mode);
            println!("  {} — {}", mode.title(), mode.description());
        }
        StudioCommand::Set(field, value) => controller.update_input(|input| match field {
            Field::Topic => input.topic = value,
            Field::Audience => input.audience = value,
            Field::Tone => input.tone = value,
            Field::Info => input.additional_info = Some(value).filter(|v| !v.is_empty()),
        }),
        StudioCommand::ClearInfo => controller.clear_additional_info(),
        StudioCommand::Generate => generate(controller, false).await,
        StudioCommand::Again => generate(controller, true).await,
        StudioCommand::Select(index) => match controller.select_item(index) {
            Ok(item) => println!("  Selecionado: {}", item.as_str()),
            Err(e) => eprintln!("  [Error] {e}"),
        },
        StudioCommand::Next(target) => match controller.transfer_context(target) {
            Ok(()) => println!(
                "  Contexto levado para {}. Use 'generate' para continuar.",
                target.title()
            ),
            Err(e) => eprintln!("  [Error] {e}"),
        },
        StudioCommand::History => {
            let entries = controller.history_for_mode();
            if entries.is_empty() {
                println!("  Nenhum histórico ainda.");
            }
            for (i, entry) in entries.into_iter().enumerate() {
                print_entry(i + 1, entry);
            }
        }
        StudioCommand::Restore(index) => {
            let entry = controller.history_for_mode().get(index).map(|e| (*e).clone());
            match entry {
                Some(entry) => {
                    controller.select_history_entry(&entry);
                    print_result(controller);
                }
                None => eprintln!("  [Error] no history entry {}", index + 1),
            }
        }
        StudioCommand::ClearHistory => {
            controller.clear_history();
            println!("  Histórico apagado.");
        }
        StudioCommand::Show => {
            let input = controller.input();
            println!("  Topic:    {}", input.topic);
            println!("  Audience: {}", input.audience);
            println!("  Tone:     {}", input.tone);
            if let Some(info) = input.extra_context() {
                println!("  Info:");
                for line in info.lines() {
                    println!("    {line}");
                }
            }
            print_result(controller);
        }
        StudioCommand::Help => println!("{HELP}"),
        StudioCommand::Quit => {}
    }
}

async fn generate(controller: &mut WorkflowController, variation: bool) {
    eprint!("  Gerando...");
    let outcome = if variation {
        controller.generate_variation().await
    } else {
        controller.generate().await
    };
    eprint!("\r           \r");

    match outcome {
        Ok(Completion::Applied) => print_result(controller),
        Ok(Completion::Discarded) => {}
        Err(e) => eprintln!("  [Error] {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes_and_transfers() {
        assert_eq!(parse_command("mode scripts"), Ok(StudioCommand::Mode(Mode::Scripts)));
        assert_eq!(parse_command("  next Captions "), Ok(StudioCommand::Next(Mode::Captions)));
        assert!(parse_command("mode reels").is_err());
    }

    #[test]
    fn parses_set_with_spaces_in_value() {
        assert_eq!(
            parse_command("set audience young adults"),
            Ok(StudioCommand::Set(Field::Audience, "young adults".into()))
        );
        assert_eq!(
            parse_command("set info"),
            Ok(StudioCommand::Set(Field::Info, String::new()))
        );
        assert!(parse_command("set colour blue").is_err());
    }

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(parse_command("select 2"), Ok(StudioCommand::Select(1)));
        assert_eq!(parse_command("restore 1"), Ok(StudioCommand::Restore(0)));
        assert!(parse_command("select 0").is_err());
        assert!(parse_command("restore x").is_err());
    }

    #[test]
    fn simple_verbs() {
        assert_eq!(parse_command("generate"), Ok(StudioCommand::Generate));
        assert_eq!(parse_command("again"), Ok(StudioCommand::Again));
        assert_eq!(parse_command("clear-info"), Ok(StudioCommand::ClearInfo));
        assert_eq!(parse_command("clear-history"), Ok(StudioCommand::ClearHistory));
        assert_eq!(parse_command("quit"), Ok(StudioCommand::Quit));
        assert!(parse_command("dance").is_err());
    }
}
