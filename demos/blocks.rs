use std::io::Read;

use code128_content::{Code128, RenderOptions};

fn main() {
    let mut msg = Vec::new();
    if atty::isnt(atty::Stream::Stdin) {
        let mut stdin = std::io::stdin();
        stdin.read_to_end(&mut msg).unwrap();
    }
    let msg = String::from_utf8(msg).unwrap();
    let code = match Code128::encode_str(msg.trim_end_matches('\n')) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    println!("{:?}", code.codewords());
    let options = RenderOptions::default().with_quiet_zone(true);
    let string = code128_content::bars_to_blocks(&code.render(&options).unwrap());
    println!("{}", &string);
    println!("{}", &string);
    println!("{}", &string);
}
