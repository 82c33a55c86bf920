//! Message types (prost — standard protobuf wire format).

use crate::model::BlogPost;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Blog {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub author_id: String,
    #[prost(string, tag = "3")]
    pub title: String,
    #[prost(string, tag = "4")]
    pub content: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateBlogRequest {
    #[prost(message, optional, tag = "1")]
    pub blog: Option<Blog>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateBlogResponse {
    #[prost(message, optional, tag = "1")]
    pub blog: Option<Blog>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReadBlogRequest {
    #[prost(string, tag = "1")]
    pub blog_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReadBlogResponse {
    #[prost(message, optional, tag = "1")]
    pub blog: Option<Blog>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateBlogRequest {
    #[prost(message, optional, tag = "1")]
    pub blog: Option<Blog>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateBlogResponse {
    #[prost(message, optional, tag = "1")]
    pub blog: Option<Blog>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteBlogRequest {
    #[prost(string, tag = "1")]
    pub blog_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteBlogResponse {
    #[prost(string, tag = "1")]
    pub blog_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListBlogRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListBlogResponse {
    #[prost(message, optional, tag = "1")]
    pub blog: Option<Blog>,
}

impl From<BlogPost> for Blog {
    fn from(post: BlogPost) -> Self {
        Blog {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
        }
    }
}

impl From<Blog> for BlogPost {
    fn from(blog: Blog) -> Self {
        BlogPost {
            id: blog.id,
            author_id: blog.author_id,
            title: blog.title,
            content: blog.content,
        }
    }
}
