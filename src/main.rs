fn main() {
    if let Err(err) = trailpace_lib::run() {
        eprintln!("trailpace: {err:#}");
        std::process::exit(1);
    }
}
