use matrix_practice::cli::Args;
use matrix_practice::gui;
use matrix_practice::session::PracticeSession;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse_args();
    let defaults = args.generation_request()?;
    let session = PracticeSession::new(args.generator_config());

    gui::run_app(session, defaults)?;

    Ok(())
}
