use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    recipe_pool::example_apps::run_draw_demo(std::env::args().skip(1))
}
