//! HTML pages served by the lambdas. Every interpolated value is escaped by maud.

use maud::{html, DOCTYPE};

pub use maud::Markup;

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                main { (content) }
            }
        }
    }
}

pub fn show_ip_page(ip: &str, country: &str) -> Markup {
    layout(
        "Your IP",
        html! {
            h1 { "Your IP is " span #ip { (ip) } }
            p { "Country: " span #country { (country) } }
        },
    )
}

pub fn create_form_page() -> Markup {
    layout(
        "Shorten a URL",
        html! {
            h1 { "Shorten a URL" }
            form method="post" {
                label for="original_url" { "URL to shorten" }
                input #original_url type="text" name="original_url" required;
                button type="submit" { "Shorten" }
            }
        },
    )
}

pub fn link_created_page(url: &str, short_url: &str) -> Markup {
    layout(
        "URL shortened",
        html! {
            h1 { "URL shortened" }
            p { "Original URL: " a href=(url) { (url) } }
            p { "Short URL: " a #short_url href=(short_url) { (short_url) } }
        },
    )
}
