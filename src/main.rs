mod app;
mod commands;
mod components;
mod context;
mod files;
mod pages;
mod pairs;
mod split;
mod theme;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
