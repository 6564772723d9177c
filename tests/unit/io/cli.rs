//! Tests for command-line parsing and command execution

#[cfg(test)]
mod tests {
    use crate::write_tile_set;
    use chassistile::io::cli::{Cli, Command, CommandRunner, export_tokens, numbered_output_path};
    use chassistile::io::codec;
    use chassistile::io::error::TileError;
    use chassistile::io::image::ExportOptions;
    use chassistile::layout::{CellIndex, Grid, TileId, catalog};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    fn execute(args: &[&str]) -> (chassistile::Result<()>, String) {
        let cli = Cli::parse_from(args.iter().copied());
        let mut runner = CommandRunner::new(cli, Vec::new());
        let result = runner.run();
        (result, String::from_utf8(runner.into_output()).unwrap())
    }

    fn index(i: usize) -> CellIndex {
        CellIndex::new(i).unwrap()
    }

    // Tests global flags parse on either side of the subcommand
    // Verified by making the flags subcommand-local
    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["chassistile", "-q", "tiles"]);
        assert!(cli.quiet);
        assert!(!cli.should_show_progress());

        let cli = Cli::parse_from(["chassistile", "random", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.should_show_progress());
    }

    // Tests export defaults
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_export_defaults() {
        let cli = Cli::parse_from(["chassistile", "export", "TOKEN"]);
        match cli.command {
            Command::Export {
                tokens,
                output,
                pixel_ratio,
                ..
            } => {
                assert_eq!(tokens, vec!["TOKEN".to_string()]);
                assert_eq!(output, PathBuf::from("chassis-layout.png"));
                assert_eq!(pixel_ratio, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    // Tests export requires at least one token
    // Verified by making tokens optional
    #[test]
    fn test_export_requires_token() {
        assert!(Cli::try_parse_from(["chassistile", "export"]).is_err());
    }

    // Tests serve options
    // Verified by dropping the short port flag
    #[test]
    fn test_serve_options() {
        let cli = Cli::parse_from([
            "chassistile",
            "serve",
            "-p",
            "8080",
            "--shell",
            "dist/index.html",
        ]);
        match cli.command {
            Command::Serve(config) => {
                assert_eq!(config.port, 8080);
                assert_eq!(config.shell, PathBuf::from("dist/index.html"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    // Tests the catalog listing
    // Verified by listing only palette names
    #[test]
    fn test_tiles_command() {
        let (result, out) = execute(&["chassistile", "tiles"]);
        result.unwrap();
        assert_eq!(out.lines().count(), catalog::entries().len());
        assert!(out.lines().any(|line| line.starts_with("amd") && line.ends_with("AMD Ryzen")));
    }

    // Tests random prints a decodable token
    // Verified by printing the empty grid
    #[test]
    fn test_random_command() {
        let (result, out) = execute(&["chassistile", "random"]);
        result.unwrap();
        let grid = codec::decode(out.trim()).unwrap();
        assert!(grid.cells().iter().all(|cell| catalog::contains(cell.tile_id.as_str())));
    }

    // Tests show prints seven rows and flags unknown ids
    // Verified by printing one cell per line
    #[test]
    fn test_show_command() {
        let grid = Grid::empty()
            .painted(index(0), TileId::new("amd"))
            .rotated(index(0))
            .painted(index(4), TileId::new("mystery"));
        let token = codec::encode(&grid);
        let (result, out) = execute(&["chassistile", "show", &token]);
        result.unwrap();

        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 7);
        assert!(rows[0].starts_with("amd:90"));
        assert!(rows[1].contains("mystery?:0"));
    }

    // Tests show rejects malformed tokens
    // Verified by printing the empty grid instead
    #[test]
    fn test_show_invalid_token() {
        let (result, out) = execute(&["chassistile", "show", "not-a-token"]);
        assert!(matches!(result, Err(TileError::InvalidLayout { .. })));
        assert!(out.is_empty());
    }

    // Tests edit runs a script file against the page URL
    // Verified by ignoring the layout in the URL
    #[test]
    fn test_edit_command() {
        let dir = tempfile::tempdir().unwrap();
        let seeded = Grid::empty().painted(index(2), TileId::new("linux"));
        let script = dir.path().join("edit.txt");
        std::fs::write(&script, "key r\nclick 2\ntoken\n").unwrap();

        let url = format!("http://localhost:3000/?layout={}", codec::encode(&seeded));
        let (result, out) = execute(&[
            "chassistile",
            "edit",
            "--url",
            &url,
            "--script",
            script.to_str().unwrap(),
        ]);
        result.unwrap();

        let token = out.lines().next().unwrap();
        let grid = codec::decode(token).unwrap();
        assert_eq!(grid, seeded.rotated(index(2)));
        assert!(out.lines().last().unwrap().starts_with("url http://localhost:3000/?layout="));
    }

    // Tests a missing script file is a file system error
    // Verified by reading stdin instead
    #[test]
    fn test_edit_missing_script() {
        let (result, _) = execute(&["chassistile", "edit", "-s", "/nonexistent/script.txt"]);
        assert!(matches!(result, Err(TileError::FileSystem { .. })));
    }

    // Tests export through the command runner
    // Verified by ignoring the output flag
    #[test]
    fn test_export_command() {
        let dir = tempfile::tempdir().unwrap();
        write_tile_set(dir.path());
        let output = dir.path().join("single.png");
        let token = codec::encode(&Grid::empty());

        let (result, _) = execute(&[
            "chassistile",
            "-q",
            "export",
            &token,
            "-o",
            output.to_str().unwrap(),
            "-a",
            dir.path().to_str().unwrap(),
            "--pixel-ratio",
            "1",
        ]);
        result.unwrap();
        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (200, 472));
    }

    // Tests several tokens produce numbered files
    // Verified by overwriting a single output
    #[test]
    fn test_export_tokens_numbered() {
        let dir = tempfile::tempdir().unwrap();
        write_tile_set(dir.path());
        let tokens = vec![
            codec::encode(&Grid::empty()),
            codec::encode(&Grid::empty().randomize()),
        ];
        let output = dir.path().join("batch.png");
        let written =
            export_tokens(&tokens, &output, &ExportOptions::with_asset_dir(dir.path()), false)
                .unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("batch-1.png"), dir.path().join("batch-2.png")]
        );
        assert!(written.iter().all(|path| path.exists()));
        assert!(!output.exists());
    }

    // Tests one bad token fails the batch before anything is written
    // Verified by exporting tokens as they decode
    #[test]
    fn test_export_tokens_rejects_bad_token() {
        let dir = tempfile::tempdir().unwrap();
        write_tile_set(dir.path());
        let tokens = vec![codec::encode(&Grid::empty()), "bogus".to_string()];
        let output = dir.path().join("batch.png");
        let options = ExportOptions::with_asset_dir(dir.path());
        let result = export_tokens(&tokens, &output, &options, false);

        assert!(matches!(result, Err(TileError::InvalidLayout { .. })));
        assert!(!dir.path().join("batch-1.png").exists());
    }

    // Tests numbered output names
    // Verified by numbering after the extension
    #[test]
    fn test_numbered_output_path() {
        assert_eq!(
            numbered_output_path(Path::new("out/layout.png"), 3),
            PathBuf::from("out/layout-3.png")
        );
        assert_eq!(
            numbered_output_path(Path::new("layout"), 1),
            PathBuf::from("layout-1")
        );
    }
}
