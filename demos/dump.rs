use nginxconf::{Builder, ConfigEntry, Mode};

type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;

fn dump(entries: &[ConfigEntry], indent: usize) {
    for e in entries {
        let args: Vec<String> = e.arguments.iter().map(|a| a.to_string()).collect();
        println!("{:indent$}{} {:?}", "", e.directive, args, indent = indent);
        dump(&e.block, indent + 4);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cfg = r#"
        # Main context.
        user  www-data;
        worker_processes 4;

        events {
            worker_connections 768;
        }

        http {
            log_format main '$remote_addr - "$request"';
            server {
                listen 80;
                server_name example.com;
                location / {
                    root /var/www/html;
                }
            }
        }
"#;

    dump(&nginxconf::parse(cfg)?, 0);

    // The last block is never closed.
    let broken = "events { worker_connections 768; }\nhttp { gzip on;";
    match nginxconf::parse(broken) {
        Err(e) => println!("{}", e),
        Ok(tree) => dump(&tree, 0),
    }
    let tree = Builder::new().mode(Mode::Lenient).parse(broken)?;
    dump(&tree, 0);

    Ok(())
}
