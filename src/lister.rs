use crate::client::SignatureRequestApi;
use crate::error::FetchError;
use crate::model::ListingPage;

/// Walks the signature request listing one page at a time, starting at page 1.
///
/// The next page is only requested when the caller asks for it, and only if
/// `page * page_size` is below the total reported by the latest response. A
/// listing failure is yielded once and ends the iteration.
pub struct Lister<'a, A: ?Sized> {
    api: &'a A,
    page_size: u32,
    next_page: Option<u32>,
}

impl<'a, A: SignatureRequestApi + ?Sized> Lister<'a, A> {
    pub fn new(api: &'a A, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            next_page: Some(1),
        }
    }
}

impl<'a, A: SignatureRequestApi + ?Sized> Iterator for Lister<'a, A> {
    type Item = Result<(u32, ListingPage), FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.next_page.take()?;

        match self.api.list_page(page, self.page_size) {
            Ok(listing) => {
                if listing.has_next(page, self.page_size) {
                    self.next_page = page.checked_add(1);
                }
                Some(Ok((page, listing)))
            }
            Err(source) => Some(Err(FetchError::Listing { page, source })),
        }
    }
}
