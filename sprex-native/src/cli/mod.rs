use self::sprite2png::Sprite2Png;

mod sprite2png;

pub enum CliRes {
    NoCli,
    Ok,
    Err,
}

pub trait Cli {
    fn name(&self) -> &'static str;
    /// Each module has to handle the arguments by itself.
    fn cli(&self) -> CliRes;
    fn cli_help(&self);
}

pub fn cli() -> CliRes {
    let mut args = std::env::args();

    // No arguments
    if args.len() <= 1 {
        return CliRes::NoCli;
    }

    // Add new modules here.
    let modules: &[&dyn Cli] = &[&Sprite2Png];

    // Skips the binary name.
    args.next();
    let command = args.next().unwrap();

    for module in modules {
        if command == module.name() {
            return module.cli();
        }
    }

    // In case nothing fits then prints this again.
    cli_help();

    CliRes::Err
}

pub fn cli_help() {
    let modules: &[&dyn Cli] = &[&Sprite2Png];

    println!(
        "\
sprex

Available modules:"
    );
    for module in modules {
        println!("{}", module.name());
    }
}
