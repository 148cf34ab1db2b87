fn main() {
    just_install::run_cli();
}
