// End-to-end behaviour of the index: config → registry → dispatch → pages.

use anyhow::{Context, Result};
use serde_json::json;
use std::{io::Write, sync::Arc};
use tempfile::NamedTempFile;
use tola_collect::{
    CollectionIndex, CollectionOptions, Comparator, IndexConfig, Item, ItemSet, PaginationConfig,
    Registry, SortOrder, paginate,
};

fn blog_posts() -> Vec<Arc<Item>> {
    let posts = json!([
        { "name": "post1", "src": "posts/1.md", "locals": { "tags": ["a"], "date": "2013-12-01", "title": "First Awesome Post" } },
        { "name": "post2", "src": "posts/2.md", "locals": { "tags": ["a", "b"], "date": "2013-12-15", "title": "Second Awesome Post" } },
        { "name": "post3", "src": "posts/3.md", "locals": { "tags": ["a", "c"], "date": "2014-01-03", "title": "Third Awesome Post" } },
        { "name": "post4", "src": "posts/4.md", "locals": { "tags": "b", "date": "2014-02-10", "title": "Fourth Awesome Post" } },
        { "name": "post5", "src": "posts/5.md", "locals": { "tags": ["c"], "date": "2014-03-22", "title": "Fifth Awesome Post" } },
        { "name": "post6", "src": "posts/6.md", "locals": { "tags": ["b", "c"], "date": "2014-04-30", "title": "Sixth Awesome Post" } },
        { "name": "about", "src": "about.md", "locals": { "title": "About" } }
    ]);
    serde_json::from_value::<Vec<Item>>(posts)
        .unwrap()
        .into_iter()
        .map(Arc::new)
        .collect()
}

#[test]
fn config_driven_index() -> Result<()> {
    let mut file = NamedTempFile::new().context("failed to allocate config file")?;
    write!(
        file,
        r#"
        [[collection]]
        name = "tag"
        plural = "tags"
        sort_order = "desc"

        [collection.pagination]
        limit = 2
        sort_by = "date"
        sort_order = "desc"

        [[collection]]
        name = "archive"
        plural = "archives"
        sort_order = "desc"

        [collection.filter]
        kind = "archive"
        field = "date"
        formats = ["%Y", "%Y-%m"]
        "#
    )?;

    let config = IndexConfig::from_path(file.path())?;
    config.validate()?;
    let mut registry = Registry::from_config(&config)?;
    registry.add_items(blog_posts())?;

    let tags = registry.get("tags").context("tags collection")?;
    assert_eq!(tags.keys(), ["c", "b", "a"]);

    // `sort_by = "date"` orders posts inside a bucket, never the buckets
    let tag_pages = tags.pages(None)?;
    let paged: Vec<_> = tag_pages.iter().flat_map(|p| p.items.iter().map(|b| b.key())).collect();
    assert_eq!(paged, tags.keys());
    assert_eq!(tag_pages.len(), 2);

    let listing = tags
        .get("b")
        .context("bucket b")?
        .pages(tags.pagination())?;
    assert_eq!(listing.len(), 2);
    let newest: Vec<_> = listing[0].items.iter().filter_map(|i| i.key()).collect();
    assert_eq!(newest, ["post6", "post4"]);
    assert_eq!(listing[1].next_page, None);

    let archives = registry.get("archives").context("archives collection")?;
    assert_eq!(archives.keys()[..2], ["2014-04", "2014-03"]);
    assert_eq!(archives.get("2014").map(|b| b.len()), Some(4));
    assert_eq!(archives.get("2013").map(|b| b.len()), Some(2));
    Ok(())
}

#[test]
fn dispatch_shares_items_across_collections() -> Result<()> {
    let mut registry = Registry::new();
    registry.create_collection(CollectionOptions::new("tag").plural("tags"));
    registry.create_collection(
        CollectionOptions::new("initial").filter(|item: &Item| {
            item.field("title")?
                .as_str()?
                .get(..1)
                .map(|c| vec![c.to_string()])
        }),
    );

    let posts = blog_posts();
    for post in &posts {
        registry.add_item(Arc::clone(post))?;
    }

    let tagged = registry.get("tags").context("tags")?.get("a").context("a")?;
    let in_initials = registry
        .get("initial")
        .context("initial")?
        .get("F")
        .context("F")?;

    let post1_tag = tagged.get("post1").context("post1 in tags")?;
    let post1_initial = in_initials.get("post1").context("post1 in initials")?;
    assert!(Arc::ptr_eq(post1_tag, post1_initial));
    assert!(Arc::ptr_eq(post1_tag, &posts[0]));
    assert_eq!(Arc::strong_count(&posts[0]), 3);
    Ok(())
}

#[test]
fn bucket_listing_sorted_by_data_field() -> Result<()> {
    let mut tags = CollectionIndex::new(CollectionOptions::new("tag").plural("tags"));
    for post in blog_posts() {
        for key in tags.resolve(&post) {
            tags.add(&key, Some(Arc::clone(&post)))?;
        }
    }

    let titles: Vec<String> = tags
        .get("c")
        .context("bucket c")?
        .items()
        .sorted(&Comparator::by_field("title"))
        .iter()
        .filter_map(|item| item.field("title")?.as_str().map(str::to_string))
        .collect();
    assert_eq!(
        titles,
        ["Fifth Awesome Post", "Sixth Awesome Post", "Third Awesome Post"]
    );

    let by_size = Comparator::by_field("size");
    let sizes: Vec<_> = tags.sort(Some(&by_size)).iter().map(|b| b.len()).collect();
    assert_eq!(sizes, [3, 3, 3]);
    Ok(())
}

#[test]
fn nested_field_lookup() -> Result<()> {
    let mut set = ItemSet::new();
    for (name, city) in [("one", "Cincinnati"), ("two", "Cleveland"), ("three", "Convington")] {
        let item = Item::new(name).with_data(json!({ "address": { "city": city, "state": "OH" } }));
        set.add(Arc::new(item))?;
    }

    let found = set
        .get_by_field("Cincinnati", "address.city")
        .context("lookup by city")?;
    assert_eq!(found.key(), Some("one"));
    assert!(set.get_by_field("Cincinnati", "address.city.name").is_none());
    Ok(())
}

#[test]
fn pagination_boundaries() -> Result<()> {
    let items: Vec<u32> = (0..25).collect();
    let pages = paginate(&items, 10)?;
    assert_eq!(pages.len(), 3);
    assert_eq!((pages[0].previous_page, pages[0].next_page), (None, Some(2)));
    assert_eq!((pages[2].item_count, pages[2].next_page), (5, None));
    assert_eq!(pages.iter().map(|p| p.item_count).sum::<usize>(), 25);

    let pages = paginate(&items[..20], 10)?;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].next_page, None);

    assert!(paginate::<u32>(&[], 10)?.is_empty());
    assert!(paginate(&items, 0).is_err());
    Ok(())
}

#[test]
fn collection_pages_follow_configured_order() -> Result<()> {
    let options = CollectionOptions::new("tag")
        .plural("tags")
        .sort_order(SortOrder::Desc)
        .pagination(PaginationConfig::with_limit(2));
    let mut tags = CollectionIndex::new(options);
    for key in ["b", "a", "c"] {
        tags.add(key, None)?;
    }

    let pages = tags.pages(None)?;
    let first: Vec<_> = pages[0].items.iter().map(|b| b.key()).collect();
    assert_eq!(first, ["c", "b"]);
    assert_eq!(pages[1].items[0].key(), "a");
    assert_eq!(pages[0].label.as_deref(), Some("tags"));
    Ok(())
}
