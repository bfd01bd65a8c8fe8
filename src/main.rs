fn main() {
    if let Err(err) = decision_tree_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
