//! List blog content

use anyhow::Result;

use crate::Staticle;

/// List blog content by type
pub fn run(blog: &Staticle, content_type: &str) -> Result<()> {
    let index = blog.load_index();

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", index.len());
            for post in index.all() {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                );
            }
        }
        "tag" | "tags" => {
            let tags = index.tag_counts();
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = index.category_counts();
            println!("Categories ({}):", categories.len());
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
