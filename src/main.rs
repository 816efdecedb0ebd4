use diagram_canvas::App;

fn main() {
	diagram_canvas::init_logging();
	leptos::mount::mount_to_body(App);
}
