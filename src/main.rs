use clap::Parser;
use std::process::ExitCode;

use triage::cli::{AlertCommands, Cli, Commands, ConfigCommands, FilterCommands};
use triage::commands::{
    EventOptions, cmd_add_to_event, cmd_assign, cmd_comment, cmd_config_get, cmd_config_set,
    cmd_config_show, cmd_disposition, cmd_filters_add, cmd_filters_offset, cmd_filters_page_size,
    cmd_filters_remove, cmd_filters_remove_category, cmd_filters_reset, cmd_filters_set,
    cmd_filters_sort, cmd_observables, cmd_tag, cmd_take_ownership,
};
use triage::error::TriageError;
use triage::logging::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    let result = match cli.command {
        Commands::Filters(command) => match command {
            FilterCommands::Reset => cmd_filters_reset().await,
            FilterCommands::Add {
                name,
                values,
                compound,
            } => cmd_filters_add(&name, values, compound).await,
            FilterCommands::Set { rows, json } => cmd_filters_set(rows, json).await,
            FilterCommands::Remove { name, index } => cmd_filters_remove(&name, index).await,
            FilterCommands::RemoveCategory { name } => cmd_filters_remove_category(&name).await,
            FilterCommands::Sort { name } => cmd_filters_sort(&name).await,
            FilterCommands::Offset { offset } => cmd_filters_offset(offset).await,
            FilterCommands::PageSize { size } => cmd_filters_page_size(size.as_deref()).await,
        },

        Commands::Alerts(command) => match command {
            AlertCommands::Disposition {
                disposition,
                comment,
                selection,
            } => cmd_disposition(&disposition, comment, &selection.uuids).await,
            AlertCommands::Comment { comment, selection } => {
                cmd_comment(&comment, &selection.uuids).await
            }
            AlertCommands::Tag { tags, selection } => cmd_tag(&tags, &selection.uuids).await,
            AlertCommands::TakeOwnership { selection } => {
                cmd_take_ownership(&selection.uuids).await
            }
            AlertCommands::Assign { user_id, selection } => {
                cmd_assign(&user_id, &selection.uuids).await
            }
            AlertCommands::AddToEvent {
                event,
                event_name,
                disposition,
                comment,
                selection,
            } => {
                cmd_add_to_event(
                    EventOptions {
                        event,
                        event_name,
                        disposition,
                        comment,
                    },
                    &selection.uuids,
                )
                .await
            }
            AlertCommands::Observables { uuid } => cmd_observables(&uuid).await,
        },

        Commands::Config(command) => match command {
            ConfigCommands::Show => cmd_config_show(),
            ConfigCommands::Set { key, value } => cmd_config_set(&key, &value),
            ConfigCommands::Get { key } => cmd_config_get(&key),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(TriageError::Aborted) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
