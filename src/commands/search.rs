//! Search posts from the command line

use anyhow::Result;

use crate::Staticle;

/// Print the posts matching `query`
pub fn run(blog: &Staticle, query: &str) -> Result<()> {
    let index = blog.load_index();
    let results = index.search(query);

    if results.is_empty() {
        println!("No posts match {:?}", query);
        return Ok(());
    }

    println!("Found {} post(s):", results.len());
    for post in results {
        println!("  {} - {} ({})", post.formatted_date, post.title, post.url);
    }

    Ok(())
}
