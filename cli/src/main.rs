//! Binary entrypoint for demopack-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = demopack_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
