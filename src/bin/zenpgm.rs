use std::process::exit;

use log::{error, info};
use zenpgm::params::{Options, create_cmd_args, parse_options};

fn run(options: &Options) -> zenpgm::Result<()> {
    let (image, input_precision) = zenpgm::load(&options.input)?;
    info!(
        "Read {} ({}x{}, precision {})",
        options.input.display(),
        image.width(),
        image.height(),
        input_precision
    );
    info!("Simulation parameters: {:?}", options.sim);

    let precision = options.precision.unwrap_or(input_precision);
    zenpgm::save(&options.output, &image, precision, options.mode)?;
    info!(
        "Wrote {} as {} precision {}",
        options.output.display(),
        options.mode.magic(),
        precision
    );
    Ok(())
}

fn main() {
    let matches = create_cmd_args().get_matches();
    let options = parse_options(&matches);

    if let Err(e) = simple_logger::init_with_level(options.log_level) {
        eprintln!("could not set up logger: {e}");
    }

    if let Err(e) = run(&options) {
        error!("Could not complete conversion, reason: {e}");
        exit(1);
    }
}
