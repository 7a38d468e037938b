use crate::shell::start_shell;

mod shell;

fn main() {
    mini_fat::logger::init();
    start_shell();
}
