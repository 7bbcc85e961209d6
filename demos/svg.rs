use std::io::Read;

use code128_content::{Code128, RenderOptions};

fn main() {
    let mut msg = Vec::new();
    if atty::isnt(atty::Stream::Stdin) {
        let mut stdin = std::io::stdin();
        stdin.read_to_end(&mut msg).unwrap();
    }
    let stroke_width = std::env::args()
        .nth(1)
        .map(|arg| arg.parse().expect("stroke width must be a number"))
        .unwrap_or(1);
    let code = match Code128::encode(&msg) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    let options = RenderOptions::default()
        .with_stroke_width(stroke_width)
        .with_quiet_zone(true);
    let rendering = code.render(&options).unwrap();
    let mut svg = String::new();
    svg += &format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}"><path d=""#,
        rendering.width(),
        rendering.height(),
    );
    for bar in rendering.bar_coordinates() {
        svg += &format!(
            r#"M{} 0h{}v{}h-{}z"#,
            bar.x,
            bar.width,
            rendering.height(),
            bar.width
        );
    }
    svg += r#""/></svg>"#;
    println!("{}", svg);
}
