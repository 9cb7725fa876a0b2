fn main() -> extract_objects::Result<()> {
    extract_objects::run(wild::args_os())
}
