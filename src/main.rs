fn main() {
    if let Err(err) = venn_layout::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
