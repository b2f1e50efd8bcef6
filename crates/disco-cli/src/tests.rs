use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["disco"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_lookup_defaults() {
    let cli = Cli::try_parse_from(["disco", "lookup", "nike.com"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Lookup {
            ref domain,
            premium: false,
            copy: None,
        }) if domain == "nike.com"
    ));
}

#[test]
fn parses_lookup_with_premium_and_copy() {
    let cli = Cli::try_parse_from(["disco", "lookup", "zara.com", "--premium", "--copy", "2"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Lookup {
            premium: true,
            copy: Some(2),
            ..
        })
    ));
}

#[test]
fn lookup_requires_domain() {
    assert!(Cli::try_parse_from(["disco", "lookup"]).is_err());
}

#[test]
fn rejects_non_numeric_copy_index() {
    assert!(Cli::try_parse_from(["disco", "lookup", "nike.com", "--copy", "first"]).is_err());
}

#[test]
fn parses_open_link() {
    let cli = Cli::try_parse_from(["disco", "open", "disco://showcodes?domain=nike.com"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Open { ref link }) if link == "disco://showcodes?domain=nike.com"
    ));
}

#[test]
fn parses_share_link_only() {
    let cli = Cli::try_parse_from(["disco", "share", "https://www.nike.com/sale", "--link-only"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Share {
            link_only: true,
            ..
        })
    ));
}

#[test]
fn parses_tutorial_reset() {
    let cli = Cli::try_parse_from(["disco", "tutorial", "reset"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Tutorial {
            command: TutorialCommands::Reset
        })
    ));
}

#[test]
fn parses_premium_on() {
    let cli = Cli::try_parse_from(["disco", "premium", "on"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Premium {
            command: PremiumCommands::On
        })
    ));
}

#[test]
fn premium_requires_subcommand() {
    assert!(Cli::try_parse_from(["disco", "premium"]).is_err());
}

#[test]
fn parses_copy() {
    let cli = Cli::try_parse_from(["disco", "copy", "SAVE10"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Copy { ref code }) if code == "SAVE10"));
}
