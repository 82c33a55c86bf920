fn main() {
    // The message types live in `src/grpc/messages.rs` (prost derives), so the
    // service is described here instead of in a `.proto` file.
    let method = |name: &str, route: &str, input: &str, output: &str| {
        tonic_build::manual::Method::builder()
            .name(name)
            .route_name(route)
            .input_type(format!("crate::grpc::messages::{input}"))
            .output_type(format!("crate::grpc::messages::{output}"))
            .codec_path("tonic::codec::ProstCodec")
    };

    let service = tonic_build::manual::Service::builder()
        .name("BlogService")
        .package("blog")
        .method(method("create_blog", "CreateBlog", "CreateBlogRequest", "CreateBlogResponse").build())
        .method(method("read_blog", "ReadBlog", "ReadBlogRequest", "ReadBlogResponse").build())
        .method(method("update_blog", "UpdateBlog", "UpdateBlogRequest", "UpdateBlogResponse").build())
        .method(method("delete_blog", "DeleteBlog", "DeleteBlogRequest", "DeleteBlogResponse").build())
        .method(
            method("list_blog", "ListBlog", "ListBlogRequest", "ListBlogResponse")
                .server_streaming()
                .build(),
        )
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}
