//! Pull tokens one at a time from an nginx configuration snippet.

use nginx_lexer::{Scanner, TokenKind};

fn main() {
    let input = "\
# upstream for the API
upstream api {
    server 127.0.0.1:8080;
}

server {
    listen 80;
    location / {
        proxy_pass http://api$request_uri;
        add_header X-Served-By 'edge \\'one\\'';
    }
}
";

    let mut scanner = Scanner::new(input).with_file("demo.conf");
    loop {
        match scanner.scan_next() {
            Ok(tok) if tok.is(TokenKind::EndOfInput) => break,
            Ok(tok) => println!("{:>8} {:<12} {:?}", tok.span.to_string(), tok.kind, tok.literal),
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }
}
