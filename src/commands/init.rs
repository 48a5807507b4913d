//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
description: ''
author: John Doe

# Base URL for canonical links and social images (no trailing slash)
url: http://example.com

# Index page metadata
keywords: ''
og_image: ''

# Navigation
profile_url: ''
profile_label: Profile

# Footer
attribution:
  text: W3Layouts
  url: https://w3layouts.com

# Directory
source_dir: source
public_dir: public

# Writing
date_format: MMMM DD, YYYY
excerpt_length: 250
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("source/img"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
path: /hello-world
date: {}
title: Hello World
metaDescription: The first post on this blog
metaKeywords: hello, blog
---

Welcome! This is your very first post. Edit it under `source/_posts`, then run:

```bash
$ folio generate
```

Posts without a `date` still get a page at their `path`, but are left out of
the index listing. Set `thumbnail: /img/cover.png` to show an image banner.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("source/_posts/hello-world.md"), sample_post)?;

    Ok(())
}
